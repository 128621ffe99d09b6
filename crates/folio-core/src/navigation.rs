//! Navigation collaborators.
//!
//! Routing and page transitions belong to the host; the core only decides
//! *when* to navigate and to which route.

use crate::constants::AUTONAV_THRESHOLD;

/// Performs a navigation. Implementations are cheap handles (cloned into
/// deferred callbacks), so the method takes `&self`.
pub trait Navigator {
    fn navigate(&self, route: &str);
}

/// Visual effect wrapped around a navigation (e.g. a view transition).
///
/// `run` performs the navigation and must be called at most once, possibly
/// later. Nothing is returned; the effect is fire-and-forget.
pub trait TransitionEffect {
    fn wrap(&self, run: Box<dyn FnOnce()>);
}

pub fn navigate_with_transition<N>(
    route: &str,
    navigator: &N,
    effect: Option<&dyn TransitionEffect>,
) where
    N: Navigator + Clone + 'static,
{
    log::info!("[nav] -> {route}");
    match effect {
        Some(effect) => {
            let navigator = navigator.clone();
            let route = route.to_string();
            effect.wrap(Box::new(move || navigator.navigate(&route)));
        }
        None => navigator.navigate(route),
    }
}

/// One-shot navigation once the page has been scrolled past a threshold.
#[derive(Clone, Debug)]
pub struct ScrollThresholdTrigger {
    threshold: f32,
    route: String,
    fired: bool,
}

impl ScrollThresholdTrigger {
    pub fn new(threshold: f32, route: impl Into<String>) -> Self {
        Self {
            threshold,
            route: route.into(),
            fired: false,
        }
    }

    pub fn with_default_threshold(route: impl Into<String>) -> Self {
        Self::new(AUTONAV_THRESHOLD, route)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn has_fired(&self) -> bool {
        self.fired
    }

    /// Returns `true` when this sample triggered the navigation.
    pub fn observe<N>(
        &mut self,
        position: f32,
        navigator: &N,
        effect: Option<&dyn TransitionEffect>,
    ) -> bool
    where
        N: Navigator + Clone + 'static,
    {
        if self.fired || !(position > self.threshold) {
            return false;
        }
        self.fired = true;
        navigate_with_transition(&self.route, navigator, effect);
        true
    }
}
