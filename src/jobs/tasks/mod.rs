mod trending_push;

pub use trending_push::TrendingPushTask;
