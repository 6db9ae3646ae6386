use std::sync::Arc;

use webring_common::{Member, Registry};
use webring_navigator::{
    Direction, NavigationRequest, Navigator, PositionResolver, ResolutionStrategy,
};

use crate::template::Template;

/// Everything a request handler needs, built once before serving.
///
/// The context is immutable and shared by `Arc`; handlers never lock.
#[derive(Debug)]
pub struct WebringContext {
    navigator: Navigator,
    resolver: Arc<dyn PositionResolver>,
    template: Template,
}

impl WebringContext {
    pub fn new(registry: Arc<Registry>, strategy: ResolutionStrategy, template: Template) -> Self {
        Self::with_resolver(registry, strategy.resolver(), template)
    }

    pub fn with_resolver(
        registry: Arc<Registry>,
        resolver: Arc<dyn PositionResolver>,
        template: Template,
    ) -> Self {
        Self {
            navigator: Navigator::new(registry),
            resolver,
            template,
        }
    }

    pub fn registry(&self) -> &Registry {
        self.navigator.registry()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn resolver_name(&self) -> &'static str {
        self.resolver.name()
    }

    /// Resolves the request and picks the member to redirect to.
    ///
    /// Returns the resolved position alongside the target so callers can log
    /// whether the random fallback was taken.
    pub fn destination(
        &self,
        direction: Direction,
        request: &NavigationRequest<'_>,
    ) -> (Option<usize>, &Member) {
        let position = match direction {
            Direction::Random => None,
            _ => self.resolver.resolve(self.registry(), request),
        };
        (position, self.navigator.navigate(direction, position))
    }

    pub fn render_index(&self) -> String {
        self.template.render(self.registry())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(strategy: ResolutionStrategy) -> WebringContext {
        let registry = Registry::build(vec![
            Member::new("A", "https://a.test"),
            Member::new("B", "https://b.test"),
            Member::new("C", "https://c.test"),
        ])
        .unwrap();
        let template = Template::parse("{{#members}}{{name}}{{/members}}").unwrap();
        WebringContext::new(Arc::new(registry), strategy, template)
    }

    #[test]
    fn test_destination_next_from_referrer() {
        let ctx = context(ResolutionStrategy::Referrer);
        let request = NavigationRequest::with_referer("https://b.test/");
        let (position, member) = ctx.destination(Direction::Next, &request);
        assert_eq!(position, Some(1));
        assert_eq!(member.url, "https://c.test");
    }

    #[test]
    fn test_destination_previous_wraps() {
        let ctx = context(ResolutionStrategy::Referrer);
        let request = NavigationRequest::with_referer("https://a.test");
        let (_, member) = ctx.destination(Direction::Previous, &request);
        assert_eq!(member.url, "https://c.test");
    }

    #[test]
    fn test_destination_query_strategy() {
        let ctx = context(ResolutionStrategy::Query);
        let request = NavigationRequest::with_query("member=c.test");
        let (position, member) = ctx.destination(Direction::Next, &request);
        assert_eq!(position, Some(2));
        assert_eq!(member.url, "https://a.test");
    }

    #[test]
    fn test_destination_random_skips_resolution() {
        let ctx = context(ResolutionStrategy::Referrer);
        let request = NavigationRequest::with_referer("https://b.test/");
        let (position, member) = ctx.destination(Direction::Random, &request);
        assert_eq!(position, None);
        assert!(ctx.registry().lookup(&member.url).is_some());
    }

    #[test]
    fn test_destination_unresolved_is_random_member() {
        let ctx = context(ResolutionStrategy::Referrer);
        let request = NavigationRequest::with_referer("https://stranger.test/");
        let (position, member) = ctx.destination(Direction::Next, &request);
        assert_eq!(position, None);
        assert!(ctx.registry().lookup(&member.url).is_some());
    }

    #[test]
    fn test_render_index() {
        let ctx = context(ResolutionStrategy::Referrer);
        assert_eq!(ctx.render_index(), "ABC");
        assert_eq!(ctx.resolver_name(), "referrer");
    }
}
