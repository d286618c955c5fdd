/// Options for resolving a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Success code of an HTTP binding without `code`
    pub default_success_code: u16,
    /// Suffix stripped (case-insensitively) from service names
    pub service_suffix: String,
    /// Major version when the service declares none
    pub default_major_version: u32,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            default_success_code: 200,
            service_suffix: "Service".to_string(),
            default_major_version: 1,
        }
    }
}

impl ResolveOptions {
    /// Interface name for a service shape identifier.
    ///
    /// A service named exactly like the suffix yields an empty name.
    pub fn interface_name<'n>(&self, service: &'n str) -> &'n str {
        let suffix_len = self.service_suffix.len();
        if suffix_len == 0 || service.len() < suffix_len {
            return service;
        }
        let split = service.len() - suffix_len;
        match (service.get(..split), service.get(split..)) {
            (Some(stem), Some(tail)) if tail.eq_ignore_ascii_case(&self.service_suffix) => stem,
            _ => service,
        }
    }
}
