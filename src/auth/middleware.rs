use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::app::AppState;
use crate::auth::cookie::SESSION_COOKIE;
use crate::auth::token::verify_token;
use crate::error::AppError;
use crate::models::User;

/// Resolves the session cookie to a `User` and stores it in the request extensions.
///
/// Requests without a valid session are answered with the 401 response directly,
/// without reaching the wrapped service. Outer middleware such as CORS still sees
/// a normal response.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            match authenticate(&req).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                Err(err) => Ok(req
                    .into_response(err.error_response())
                    .map_into_right_body()),
            }
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<User, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::InternalServerError("AppState is not registered".into()))?;

    let token = req
        .cookie(SESSION_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            AppError::Unauthorized("Authorization denied: No token provided".into())
        })?;

    let claims = verify_token(&token, &state.config.jwt_secret)?;

    state
        .store
        .find_user_by_id(claims.sub)
        .await?
        .ok_or_else(|| {
            log::warn!("Session token for unknown user {}", claims.sub);
            AppError::Unauthorized("User not found".into())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::extractors::AuthenticatedUser;
    use crate::auth::token::generate_token;
    use crate::config::Config;
    use crate::models::UserRecord;
    use crate::store::{MemoryStore, Store};
    use actix_web::cookie::Cookie;
    use actix_web::{test, App, HttpResponse};
    use std::sync::Arc;

    async fn whoami(AuthenticatedUser(user): AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username)
    }

    async fn state_with_user() -> (AppState, User) {
        let store = MemoryStore::new();
        let user = store
            .insert_user(UserRecord::new(
                "alice".into(),
                "a@x.com".into(),
                "hash".into(),
            ))
            .await
            .unwrap();
        (AppState::new(Arc::new(store), Config::new("secret")), user)
    }

    #[actix_rt::test]
    async fn test_rejection_is_a_response() {
        let (state, _) = state_with_user().await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::resource("/me").wrap(AuthMiddleware).to(whoami)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/me").to_request()).await;
        assert_eq!(resp.status().as_u16(), 401);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Authorization denied: No token provided");
    }

    #[actix_rt::test]
    async fn test_valid_session_reaches_handler() {
        let (state, user) = state_with_user().await;
        let token = generate_token(user.id, &user.email, "secret", chrono::Duration::days(1)).unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(web::resource("/me").wrap(AuthMiddleware).to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 200);
        assert_eq!(test::read_body(resp).await, "alice");
    }
}
