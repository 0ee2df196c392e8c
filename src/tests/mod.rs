mod archive;
mod layout;
mod members;
mod primitives;
