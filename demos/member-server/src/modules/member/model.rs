use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDto {
    pub member_id: String,
    pub name: String,
}

impl MemberDto {
    pub fn new(member_id: impl Into<String>) -> Self {
        let member_id = member_id.into();
        let name = format!("hello {}", member_id);
        Self { member_id, name }
    }
}
