pub mod employees;
mod view;
