pub mod toss_client;
