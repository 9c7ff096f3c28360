pub mod conversion_chat_request;
pub mod conversion_chat_response;
pub mod conversion_chat_route;
