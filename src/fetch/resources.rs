/// Locators of the three dump1090 feeds under a common base.
#[derive(Debug, Clone)]
pub struct Resources {
    pub base: String,
    pub receiver: String,
    pub stats: String,
    pub aircraft: String,
}

impl Resources {
    pub fn new(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            receiver: format!("{}/receiver.json", base),
            stats: format!("{}/stats.json", base),
            aircraft: format!("{}/aircraft.json", base),
            base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_feed_locators() {
        let resources = Resources::new("http://localhost:8080/data/");
        assert_eq!(resources.base, "http://localhost:8080/data");
        assert_eq!(resources.receiver, "http://localhost:8080/data/receiver.json");
        assert_eq!(resources.stats, "http://localhost:8080/data/stats.json");
        assert_eq!(resources.aircraft, "http://localhost:8080/data/aircraft.json");
    }

    #[test]
    fn works_with_directories() {
        let resources = Resources::new("/run/dump1090-fa");
        assert_eq!(resources.aircraft, "/run/dump1090-fa/aircraft.json");
    }
}
