pub mod price_list;
