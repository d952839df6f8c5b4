pub mod tryon_generate_response;
