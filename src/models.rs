//! Column names and summary descriptors shared by the pipeline stages.

pub mod columns {
    pub const ID: &str = "id";
    pub const NEIGHBOURHOOD: &str = "neighbourhood_cleansed";
    pub const PRICE: &str = "price";
    pub const ROOM_TYPE: &str = "room_type";
    pub const NUMBER_OF_REVIEWS: &str = "number_of_reviews";
    pub const AVAILABILITY_365: &str = "availability_365";
    pub const HOST_ID: &str = "host_id";
    pub const ESTIMATED_REVENUE: &str = "estimated_revenue";
    pub const PROPERTY_TYPE: &str = "property_type";
}

pub const CLEANED_FILE_NAME: &str = "listings_clean.csv";
pub const TOP_HOSTS_LIMIT: u32 = 10;

/// The grouped summaries the aggregator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SummaryKind {
    ListingsByNeighbourhood,
    ReviewsByRoomType,
    TopHostsRevenue,
    AvgPriceByPropertyType,
}

impl SummaryKind {
    pub const ALL: [SummaryKind; 4] = [
        SummaryKind::ListingsByNeighbourhood,
        SummaryKind::ReviewsByRoomType,
        SummaryKind::TopHostsRevenue,
        SummaryKind::AvgPriceByPropertyType,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SummaryKind::ListingsByNeighbourhood => "listings_by_neighbourhood",
            SummaryKind::ReviewsByRoomType => "reviews_by_room_type",
            SummaryKind::TopHostsRevenue => "top_hosts_revenue",
            SummaryKind::AvgPriceByPropertyType => "avg_price_by_property_type",
        }
    }

    pub fn key_column(&self) -> &'static str {
        match self {
            SummaryKind::ListingsByNeighbourhood => columns::NEIGHBOURHOOD,
            SummaryKind::ReviewsByRoomType => columns::ROOM_TYPE,
            SummaryKind::TopHostsRevenue => columns::HOST_ID,
            SummaryKind::AvgPriceByPropertyType => columns::PROPERTY_TYPE,
        }
    }

    pub fn value_column(&self) -> &'static str {
        match self {
            SummaryKind::ListingsByNeighbourhood => "listing_count",
            SummaryKind::ReviewsByRoomType => "total_reviews",
            SummaryKind::TopHostsRevenue => "total_revenue",
            SummaryKind::AvgPriceByPropertyType => "avg_price",
        }
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            SummaryKind::ListingsByNeighbourhood => &[columns::NEIGHBOURHOOD, columns::ID],
            SummaryKind::ReviewsByRoomType => &[columns::ROOM_TYPE, columns::NUMBER_OF_REVIEWS],
            SummaryKind::TopHostsRevenue => &[columns::HOST_ID, columns::ESTIMATED_REVENUE],
            SummaryKind::AvgPriceByPropertyType => &[columns::PROPERTY_TYPE, columns::PRICE],
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.csv", self.name())
    }
}

/// Counters collected while cleaning the raw table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub rows_in: usize,
    pub duplicates_removed: usize,
    pub null_rows_dropped: usize,
    pub availability_coerced: usize,
    pub rows_out: usize,
}
