// Feature text processing: tokenize, filter, stem, vectorize.

pub mod stem;
pub mod tokenize;
pub mod vectorize;
