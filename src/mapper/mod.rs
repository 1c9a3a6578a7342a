mod data_mapper;

pub use data_mapper::{DataMapper, EXCLUDED};
