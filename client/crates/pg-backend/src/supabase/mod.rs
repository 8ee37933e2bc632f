mod api_error_body;
mod auto_refresh;
mod supabase_backend;

pub use supabase_backend::SupabaseBackend;

pub(crate) use api_error_body::ApiErrorBody;
pub(crate) use supabase_backend::parse_sign_up;
