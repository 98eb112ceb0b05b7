use super::model::MemberDto;
use exhandler::Exception;

/// Looks members up by id. A few ids are reserved to raise each kind of fault.
#[derive(Debug, Default)]
pub struct MemberService;

impl MemberService {
    pub fn new() -> Self {
        Self
    }

    pub fn find(&self, id: &str) -> Result<MemberDto, Exception> {
        match id {
            "ex" => Err(Exception::runtime("잘못된 사용자")),
            "bad" => Err(Exception::invalid_argument("잘못 입력 값")),
            "user-ex" => Err(Exception::user("사용자 에러")),
            _ => Ok(MemberDto::new(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exhandler::ErrorKind;

    #[test]
    fn test_find_member() {
        let member = MemberService::new().find("spring").unwrap();
        assert_eq!(member, MemberDto::new("spring"));
        assert_eq!(member.name, "hello spring");
    }

    #[test]
    fn test_reserved_ids_raise() {
        let service = MemberService::new();
        assert_eq!(service.find("ex").unwrap_err().kind(), ErrorKind::Generic);
        assert_eq!(service.find("bad").unwrap_err().kind(), ErrorKind::InvalidArgument);
        assert_eq!(service.find("user-ex").unwrap_err().kind(), ErrorKind::UserFault);
    }
}
