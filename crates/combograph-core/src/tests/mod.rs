mod builder;
mod sanitize;
