use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use shared::{WeekContent, MAX_PREGNANCY_WEEK};

use crate::services::api::ContentTransport;
use crate::services::logging::Logger;

/// Shared "a fetch is in flight" flag. Counts overlapping fetches so the flag
/// only drops once the last one finishes.
#[derive(Clone, Default)]
pub struct LoadingFlag {
    in_flight: Rc<Cell<u32>>,
}

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        self.in_flight.get() > 0
    }

    /// Marks a fetch as running until the guard is dropped
    pub fn begin(&self) -> LoadingGuard {
        self.in_flight.set(self.in_flight.get() + 1);
        LoadingGuard { flag: self.clone() }
    }
}

pub struct LoadingGuard {
    flag: LoadingFlag,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let in_flight = &self.flag.in_flight;
        in_flight.set(in_flight.get().saturating_sub(1));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket(u64);

/// Hands out increasing tickets; only the latest one is current. Responses
/// carrying an older ticket are stale.
#[derive(Clone, Default)]
pub struct RequestSequencer {
    latest: Rc<Cell<u64>>,
}

impl RequestSequencer {
    pub fn issue(&self) -> RequestTicket {
        let next = self.latest.get() + 1;
        self.latest.set(next);
        RequestTicket(next)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.get() == ticket.0
    }
}

/// Week content fetching with a session cache
pub struct ContentService<T> {
    transport: Rc<T>,
    cache: Rc<RefCell<HashMap<u32, WeekContent>>>,
    loading: LoadingFlag,
    logger: Logger,
}

impl<T> Clone for ContentService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            cache: self.cache.clone(),
            loading: self.loading.clone(),
            logger: self.logger.clone(),
        }
    }
}

impl<T> PartialEq for ContentService<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cache, &other.cache)
    }
}

fn is_valid_week(week: u32) -> bool {
    (1..=MAX_PREGNANCY_WEEK).contains(&week)
}

impl<T: ContentTransport> ContentService<T> {
    pub fn new(transport: T, logger: Logger) -> Self {
        Self {
            transport: Rc::new(transport),
            cache: Rc::new(RefCell::new(HashMap::new())),
            loading: LoadingFlag::default(),
            logger,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    pub fn cached(&self, week: u32) -> Option<WeekContent> {
        self.cache.borrow().get(&week).cloned()
    }

    /// Everything fetched so far this session
    pub fn cached_weeks(&self) -> Vec<WeekContent> {
        let mut weeks: Vec<WeekContent> = self.cache.borrow().values().cloned().collect();
        weeks.sort_by_key(|w| w.week);
        weeks
    }

    /// Content for one week. Transport failures are logged and yield `None`.
    pub async fn fetch_week_data(&self, week: u32) -> Option<WeekContent> {
        if !is_valid_week(week) {
            self.logger.warn(&format!("Ignoring request for invalid week {}", week));
            return None;
        }
        if let Some(content) = self.cached(week) {
            return Some(content);
        }

        let _guard = self.loading.begin();
        match self.transport.get_week(week).await {
            Ok(content) => {
                self.cache.borrow_mut().insert(week, content.clone());
                Some(content)
            }
            Err(e) => {
                self.logger.error(&format!("Failed to fetch week {}: {}", week, e));
                None
            }
        }
    }

    /// Content for an inclusive week range. Bounds are clamped into 1-42 and
    /// swapped if reversed. Transport failures are logged and yield an empty list.
    pub async fn fetch_week_range(&self, from: u32, to: u32) -> Vec<WeekContent> {
        let (from, to) = if from <= to { (from, to) } else { (to, from) };
        let from = from.max(1);
        let to = to.min(MAX_PREGNANCY_WEEK);
        if from > to {
            self.logger.warn(&format!("Ignoring empty week range {}-{}", from, to));
            return Vec::new();
        }

        let _guard = self.loading.begin();
        match self.transport.get_week_range(from, to).await {
            Ok(weeks) => {
                let mut cache = self.cache.borrow_mut();
                for content in &weeks {
                    cache.insert(content.week, content.clone());
                }
                weeks
            }
            Err(e) => {
                self.logger.error(&format!("Failed to fetch weeks {}-{}: {}", from, to, e));
                Vec::new()
            }
        }
    }
}
