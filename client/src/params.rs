//! Wire-level list query parameters.
//!
//! The parameter names here are a stable contract with the resource API.
//! Unset and empty-after-trim values are omitted entirely; the wire never
//! carries empty-string params.

use rostra_engine::DEFAULT_PAGE_SIZE;

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Parameters for a list operation.
#[derive(Debug, Clone)]
pub struct ListParams {
    /// Zero-based page index
    pub page: u32,
    /// Page size
    pub size: u32,
    pub search: Option<String>,
    pub status: Option<String>,
    pub job_mode: Option<String>,
    pub client_name: Option<String>,
    pub skills: Option<String>,
    pub experience: Option<String>,
    pub location: Option<String>,
    pub min_salary: Option<u64>,
    pub max_salary: Option<u64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
    /// Resource-specific filters outside the fixed set
    pub extra: Vec<(String, String)>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            search: None,
            status: None,
            job_mode: None,
            client_name: None,
            skills: None,
            experience: None,
            location: None,
            min_salary: None,
            max_salary: None,
            start_date: None,
            end_date: None,
            sort_by: None,
            sort_direction: None,
            extra: Vec::new(),
        }
    }
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style page selection.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn sort(mut self, by: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(by.into());
        self.sort_direction = Some(direction);
        self
    }

    /// Attach a resource-specific filter pair.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Serialize to wire query pairs. `page` and `size` are always sent;
    /// everything else only when set and non-blank after trimming.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];

        let mut push_opt = |key: &str, value: Option<&str>| {
            if let Some(v) = value {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    query.push((key.to_string(), trimmed.to_string()));
                }
            }
        };

        push_opt("search", self.search.as_deref());
        push_opt("status", self.status.as_deref());
        push_opt("jobMode", self.job_mode.as_deref());
        push_opt("clientName", self.client_name.as_deref());
        push_opt("skills", self.skills.as_deref());
        push_opt("experience", self.experience.as_deref());
        push_opt("location", self.location.as_deref());
        push_opt("minSalary", self.min_salary.map(|v| v.to_string()).as_deref());
        push_opt("maxSalary", self.max_salary.map(|v| v.to_string()).as_deref());
        push_opt("startDate", self.start_date.as_deref());
        push_opt("endDate", self.end_date.as_deref());
        push_opt("sortBy", self.sort_by.as_deref());
        push_opt(
            "sortDirection",
            self.sort_direction.map(SortDirection::as_str),
        );

        for (key, value) in &self.extra {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                query.push((key.clone(), trimmed.to_string()));
            }
        }

        query
    }
}
