pub mod tryon_fetch_response;
