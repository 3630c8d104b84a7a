mod common;
mod evaluator;
mod export;
mod routing;
