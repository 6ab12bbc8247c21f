use crate::repository::user_repository::DynUserRepository;
use crate::service::role_cache::RoleCache;
use crate::service::token_service::TokenService;

/// Everything the bearer-token middleware needs to turn a header into a `CurrentUser`.
#[derive(Clone)]
pub struct TokenState {
    pub token_service: TokenService,
    pub user_repo: DynUserRepository,
    pub role_cache: RoleCache,
}

impl TokenState {
    pub fn new(user_repo: &DynUserRepository, token_service: TokenService, role_cache: RoleCache) -> Self {
        Self {
            token_service,
            user_repo: user_repo.clone(),
            role_cache,
        }
    }
}
