//! User service

use sqlx::PgPool;

use crate::{
    auth::RequestContext,
    db::repositories::UserRepository,
    error::{AppError, AppResult},
    handlers::users::{UpdateUserRequest, UpdateUserResponse, UserResponse, UsersResponse},
};

/// User service for business logic
pub struct UserService;

impl UserService {
    /// Look up the user the gate resolved, or list everyone when there is no target
    pub async fn get_users(pool: &PgPool, ctx: &RequestContext) -> AppResult<UsersResponse> {
        match ctx.target_email.as_deref() {
            Some(email) => {
                let user = UserRepository::find_by_email(pool, email)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

                Ok(UsersResponse::One(user.into()))
            }
            None => {
                let users = UserRepository::list_all(pool).await?;

                Ok(UsersResponse::All(users.into_iter().map(UserResponse::from).collect()))
            }
        }
    }

    /// Update phone and description of the target user
    pub async fn update_user(
        pool: &PgPool,
        ctx: &RequestContext,
        payload: UpdateUserRequest,
    ) -> AppResult<UpdateUserResponse> {
        let email = ctx
            .target_email
            .as_deref()
            .ok_or_else(|| AppError::InvalidInput("Missing user email".to_string()))?;

        if UserRepository::find_by_email(pool, email).await?.is_none() {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let user =
            UserRepository::update_profile(pool, email, &payload.phone, &payload.description)
                .await?;

        Ok(UpdateUserResponse { user: user.into() })
    }
}
