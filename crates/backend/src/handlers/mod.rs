pub mod d400_ecommerce_overview;
