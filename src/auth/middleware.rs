use std::{
    future::{ready, Ready},
    rc::Rc,
};

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures::future::LocalBoxFuture;

use crate::{
    app_state::AppState,
    auth::{policy::requires_login, session::SessionData, session_service::SESSION_COOKIE},
    errors::AppError,
};

/// Decodes the session cookie for every request and rejects protected routes
/// without an authenticated session before the handler runs.
pub struct RequireLogin;

impl<S, B> Transform<S, ServiceRequest> for RequireLogin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireLoginService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireLoginService {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireLoginService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireLoginService<S>
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
            let session = match req.app_data::<web::Data<AppState>>() {
                Some(state) => {
                    let cookie = req.cookie(SESSION_COOKIE);
                    state.sessions.read(cookie.as_ref().map(|c| c.value()))
                }
                None => SessionData::default(),
            };

            if requires_login(req.method(), req.path()) && !session.logged_in {
                log::debug!("Rejecting unauthenticated {} {}", req.method(), req.path());
                let response =
                    AppError::Unauthorized("Authentication required".to_string()).error_response();
                return Ok(req.into_response(response).map_into_right_body());
            }

            req.extensions_mut().insert(session);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

/// Extractor for the caller's session state. Falls back to decoding the
/// cookie when `RequireLogin` is not in the chain.
pub struct CurrentSession(pub SessionData);

impl FromRequest for CurrentSession {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(session) = req.extensions().get::<SessionData>() {
            return ready(Ok(CurrentSession(session.clone())));
        }

        let session = req
            .app_data::<web::Data<AppState>>()
            .map(|state| {
                let cookie = req.cookie(SESSION_COOKIE);
                state.sessions.read(cookie.as_ref().map(|c| c.value()))
            })
            .ok_or_else(|| AppError::InternalError("Session service not configured".to_string()));

        ready(session.map(CurrentSession))
    }
}
