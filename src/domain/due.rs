use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::options::DueDateFilter;

/// Due-date bucket a card falls into when grouping by due date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    Overdue,
    Today,
    ThisWeek,
    Later,
    NoDueDate,
}

impl DueBucket {
    /// Buckets in board order
    pub const ALL: [DueBucket; 5] = [
        DueBucket::Overdue,
        DueBucket::Today,
        DueBucket::ThisWeek,
        DueBucket::Later,
        DueBucket::NoDueDate,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Overdue => "Overdue",
            Self::Today => "Due Today",
            Self::ThisWeek => "Due This Week",
            Self::Later => "Due Later",
            Self::NoDueDate => "No Due Date",
        }
    }
}

/// Day boundaries relative to a reference "today"
///
/// All bounds are local midnights of the reference time zone, stored as UTC
/// instants so they compare directly against card dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DueWindow {
    today: DateTime<Utc>,
    tomorrow: DateTime<Utc>,
    week_end: DateTime<Utc>,
    month_end: DateTime<Utc>,
}

impl DueWindow {
    /// Window anchored at the local midnight preceding `now`
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let tz = now.timezone();
        let date = now.date_naive();

        Self {
            today: local_midnight(&tz, date),
            tomorrow: local_midnight(&tz, date + Duration::days(1)),
            week_end: local_midnight(&tz, date + Duration::days(7)),
            month_end: local_midnight(&tz, date + Duration::days(30)),
        }
    }

    /// Window for the current moment in the system time zone
    pub fn now() -> Self {
        Self::at(&Local::now())
    }

    pub fn today(&self) -> DateTime<Utc> {
        self.today
    }

    /// Whether `due` satisfies the due-date filter.
    ///
    /// `DueDateFilter::None` accepts every date; the "card has no due date"
    /// case is handled by the caller.
    pub fn matches(&self, filter: DueDateFilter, due: DateTime<Utc>) -> bool {
        match filter {
            DueDateFilter::Overdue => due < self.today,
            DueDateFilter::Today => due >= self.today && due < self.tomorrow,
            DueDateFilter::ThisWeek => due >= self.today && due <= self.week_end,
            DueDateFilter::ThisMonth => due >= self.today && due <= self.month_end,
            DueDateFilter::None => true,
        }
    }

    pub fn bucket(&self, due: Option<DateTime<Utc>>) -> DueBucket {
        match due {
            None => DueBucket::NoDueDate,
            Some(due) if due < self.today => DueBucket::Overdue,
            Some(due) if due < self.tomorrow => DueBucket::Today,
            Some(due) if due <= self.week_end => DueBucket::ThisWeek,
            Some(_) => DueBucket::Later,
        }
    }
}

impl Default for DueWindow {
    fn default() -> Self {
        Self::now()
    }
}

// Start of `date` in `tz`. When a DST jump skips midnight, the day starts at
// the first local time that exists.
fn local_midnight<Tz: TimeZone>(tz: &Tz, date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    let mut candidate = midnight;

    while candidate.date() == date {
        if let Some(start) = tz.from_local_datetime(&candidate).earliest() {
            return start.with_timezone(&Utc);
        }
        candidate += Duration::minutes(15);
    }

    Utc.from_utc_datetime(&midnight)
}
