mod controller;
mod model;
mod service;

pub use controller::MemberController;
pub use model::MemberDto;
pub use service::MemberService;
