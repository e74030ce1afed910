pub mod glowmarkt;
