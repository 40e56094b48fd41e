// Configuration API: versioned fact-group snapshots over store::ConfigurationStore.

pub mod handlers;
