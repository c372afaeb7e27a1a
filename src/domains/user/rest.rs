use axum::{extract::State, response::Json as JsonResponse, routing::post, Router};

use super::model::{CreateUserRequest, User, UserLoginRequest};
use crate::{app::method_not_allowed, extractors::ApiJson, state::SharedAppState, AppError};

pub fn user_routes() -> Router<SharedAppState> {
  Router::new()
    .route("/user/register", post(register_user_handler).fallback(method_not_allowed("POST")))
    .route("/user/login", post(login_handler).fallback(method_not_allowed("POST")))
}

pub async fn register_user_handler(
  State(state): State<SharedAppState>,
  ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<JsonResponse<User>, AppError> {
  let user = state.user_service.register(payload).await?;
  Ok(JsonResponse(user))
}

pub async fn login_handler(
  State(state): State<SharedAppState>,
  ApiJson(payload): ApiJson<UserLoginRequest>,
) -> Result<JsonResponse<&'static str>, AppError> {
  state.user_service.login(payload).await?;
  Ok(JsonResponse("ok"))
}
