pub mod callback_query;
pub mod oauth;
