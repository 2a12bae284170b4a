//! Customer routes: list, detail/history, payment and order recording

pub mod api;
pub mod page;

pub use api::{
    api_customer, api_customer_history, api_customers, api_order_store, htmx_customers_list,
    payment_store,
};
pub use page::{page_customer_detail, page_customers};
