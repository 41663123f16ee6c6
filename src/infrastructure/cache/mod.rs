pub mod redis_session_cache;

pub use redis_session_cache::RedisSessionCache;
