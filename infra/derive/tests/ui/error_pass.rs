use ironseal_derive::ironseal_error;
use std::borrow::Cow;

#[ironseal_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[redacted]
    #[error("Demo rejected")]
    Rejected {},

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let err = DemoError::Rejected {};
    assert_eq!(err.kind(), "Rejected");
}
