pub const API_URL: &str = "https://stablediffusionapi.com/api/v5/fashion";
