mod delete;
mod write;
