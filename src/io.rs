pub mod glowmarkt_client;
pub mod output;
