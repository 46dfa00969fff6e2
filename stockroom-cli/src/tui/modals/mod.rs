pub mod product_form;
