pub mod tryon_image;
