/// Encoded string output command.
pub mod encode;
/// SNBT template item command.
pub mod item;
/// Wire record JSON command.
pub mod records;
/// CodeClient scope query/request command.
pub mod scopes;
/// CodeClient delivery command.
pub mod send;
/// Shared document loading and client settings.
pub mod util;
