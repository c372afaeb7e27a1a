use axum::{
  extract::State,
  response::Json as JsonResponse,
  routing::{get, Router},
};

use super::model::{Account, CreateAccountRequest, UpdateAccountRequest};
use crate::{
  app::method_not_allowed,
  extractors::{ApiJson, ApiPath},
  state::SharedAppState,
  AppError,
};

pub fn account_routes() -> Router<SharedAppState> {
  Router::new()
    .route(
      "/account",
      get(list_accounts_handler)
        .post(create_account_handler)
        .fallback(method_not_allowed("GET, HEAD, POST")),
    )
    .route(
      "/account/{id}",
      get(get_account_handler)
        .post(update_account_handler)
        .delete(delete_account_handler)
        .fallback(method_not_allowed("GET, HEAD, POST, DELETE")),
    )
}

pub async fn list_accounts_handler(
  State(state): State<SharedAppState>,
) -> Result<JsonResponse<Vec<Account>>, AppError> {
  let accounts = state.store.get_all_accounts().await?;
  Ok(JsonResponse(accounts))
}

pub async fn create_account_handler(
  State(state): State<SharedAppState>,
  ApiJson(payload): ApiJson<CreateAccountRequest>,
) -> Result<JsonResponse<Account>, AppError> {
  let mut account = Account::new(payload.first_name, payload.last_name);
  account.id = state.store.create_account(&account).await?;

  tracing::info!(account_id = account.id, "account created");
  Ok(JsonResponse(account))
}

pub async fn get_account_handler(
  State(state): State<SharedAppState>,
  ApiPath(id): ApiPath<i64>,
) -> Result<JsonResponse<Account>, AppError> {
  state
    .store
    .get_account_by_id(id)
    .await?
    .map(JsonResponse)
    .ok_or_else(|| AppError::not_found(format!("account {} not found", id)))
}

pub async fn update_account_handler(
  State(state): State<SharedAppState>,
  ApiPath(id): ApiPath<i64>,
  ApiJson(changes): ApiJson<UpdateAccountRequest>,
) -> Result<JsonResponse<&'static str>, AppError> {
  state.store.update_account(id, &changes).await?;

  tracing::info!(account_id = id, "account updated");
  Ok(JsonResponse("ok"))
}

pub async fn delete_account_handler(
  State(state): State<SharedAppState>,
  ApiPath(id): ApiPath<i64>,
) -> Result<JsonResponse<&'static str>, AppError> {
  state.store.delete_account(id).await?;

  tracing::info!(account_id = id, "account deleted");
  Ok(JsonResponse("ok"))
}
