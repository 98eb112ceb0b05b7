use super::model::MemberDto;
use super::service::MemberService;
use exhandler::prelude::*;

pub struct MemberController {
    service: Arc<MemberService>,
}

impl MemberController {
    pub fn new(service: Arc<MemberService>) -> Self {
        Self { service }
    }

    pub fn base_path() -> &'static str {
        "/api/members"
    }

    pub fn router(controller: Arc<Self>) -> Router {
        Router::new()
            .route("/{id}", axum::routing::get(Self::get_one))
            .with_state(controller)
    }

    async fn get_one(
        State(controller): State<Arc<Self>>,
        Path(id): Path<String>,
    ) -> Result<Json<MemberDto>, Exception> {
        tracing::info!(id = %id, "call get_one");
        let member = controller.service.find(&id)?;
        Ok(Json(member))
    }
}
