pub mod unit_selection_request;
pub mod unit_selection_response;
pub mod unit_selection_route;
