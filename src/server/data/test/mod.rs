mod asset;
mod comment;
mod favorite;
mod refresh_token;
mod tag;
mod user;
mod work;
