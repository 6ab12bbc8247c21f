use crate::repository::user_repository::DynUserRepository;
use crate::service::user_service::UserService;

#[derive(Clone)]
pub struct UserState {
    pub user_service: UserService,
}

impl UserState {
    pub fn new(user_repo: &DynUserRepository) -> Self {
        Self {
            user_service: UserService::new(user_repo.clone()),
        }
    }
}
