/// Gallery scene behavior.
mod gallery;
