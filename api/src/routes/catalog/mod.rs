pub mod formats_route;
pub mod units_route;
