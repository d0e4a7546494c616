// One module per resource; each handler translates the HTTP request into
// records-store calls and serializes the result.

pub mod comments;
pub mod posts;
pub mod slack;
pub mod subscribers;
pub mod tags;
pub mod users;
