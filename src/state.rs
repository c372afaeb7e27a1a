use std::sync::Arc;

use crate::{domains::user::service::UserService, storage::Storage};

#[derive(Clone)]
pub struct SharedAppState {
  pub store: Arc<dyn Storage>,
  pub user_service: Arc<UserService>,
}

impl SharedAppState {
  pub fn new(store: Arc<dyn Storage>, bcrypt_cost: u32) -> Self {
    let user_service = Arc::new(UserService::new(Arc::clone(&store), bcrypt_cost));

    Self { store, user_service }
  }
}
