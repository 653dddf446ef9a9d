use woothee::parser::Parser;

/// Flags user agents that woothee categorizes as crawlers.
pub struct CrawlerDetector {
    parser: Parser,
}

impl CrawlerDetector {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn is_crawler(&self, user_agent: &str) -> bool {
        self.parser
            .parse(user_agent)
            .is_some_and(|result| result.category == "crawler")
    }
}

impl Default for CrawlerDetector {
    fn default() -> Self {
        Self::new()
    }
}
