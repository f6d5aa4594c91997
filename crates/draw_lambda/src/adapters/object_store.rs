/// Blocking view of the bucket holding entries and draw results.
pub trait EntryStore {
    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, String>;
    fn read_object(&self, key: &str) -> Result<Vec<u8>, String>;
    fn write_object(&self, key: &str, body: &[u8]) -> Result<(), String>;
}

/// Stand-in used when configuration is incomplete and no client was built.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredStore;

impl EntryStore for UnconfiguredStore {
    fn list_keys(&self, _prefix: &str) -> Result<Vec<String>, String> {
        Err("object store is not configured".to_string())
    }

    fn read_object(&self, _key: &str) -> Result<Vec<u8>, String> {
        Err("object store is not configured".to_string())
    }

    fn write_object(&self, _key: &str, _body: &[u8]) -> Result<(), String> {
        Err("object store is not configured".to_string())
    }
}
