pub mod comment_usecase;
pub mod session_usecase;

pub use comment_usecase::CommentUseCase;
pub use session_usecase::SessionUseCase;
