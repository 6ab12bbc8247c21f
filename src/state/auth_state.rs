use crate::repository::user_repository::DynUserRepository;
use crate::service::auth_service::AuthService;
use crate::service::token_service::TokenService;

#[derive(Clone)]
pub struct AuthState {
    pub(crate) auth_service: AuthService,
}

impl AuthState {
    pub fn new(user_repo: &DynUserRepository, token_service: TokenService) -> Self {
        Self {
            auth_service: AuthService::new(user_repo.clone(), token_service),
        }
    }
}
