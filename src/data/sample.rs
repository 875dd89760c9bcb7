use chrono::NaiveDate;

use super::model::{PassengerDataset, PassengerRecord};

/// First year of the classic Box & Jenkins airline series.
pub const FIRST_YEAR: i32 = 1949;

/// Monthly international airline passengers (thousands), 1949–1960,
/// one row per year, January first.
pub const AIR_PASSENGERS: [[i64; 12]; 12] = [
    [112, 118, 132, 129, 121, 135, 148, 148, 136, 119, 104, 118],
    [115, 126, 141, 135, 125, 149, 170, 170, 158, 133, 114, 140],
    [145, 150, 178, 163, 172, 178, 199, 199, 184, 162, 146, 166],
    [171, 180, 193, 181, 183, 218, 230, 242, 209, 191, 172, 194],
    [196, 196, 236, 235, 229, 243, 264, 272, 237, 211, 180, 201],
    [204, 188, 235, 227, 234, 264, 302, 293, 259, 229, 203, 229],
    [242, 233, 267, 269, 270, 315, 364, 347, 312, 274, 237, 278],
    [284, 277, 317, 313, 318, 374, 413, 405, 355, 306, 271, 306],
    [315, 301, 356, 348, 355, 422, 465, 467, 404, 347, 305, 336],
    [340, 318, 362, 348, 363, 435, 491, 505, 404, 359, 310, 337],
    [360, 342, 406, 396, 420, 472, 548, 559, 463, 407, 362, 405],
    [417, 391, 419, 461, 472, 535, 622, 606, 508, 461, 390, 432],
];

/// The series as (`YYYY-MM`, passengers) pairs in chronological order.
pub fn rows() -> impl Iterator<Item = (String, i64)> {
    AIR_PASSENGERS.iter().enumerate().flat_map(|(y, months)| {
        months.iter().enumerate().map(move |(m, &p)| {
            (format!("{:04}-{:02}", FIRST_YEAR + y as i32, m + 1), p)
        })
    })
}

/// The series as a ready-made dataset.
pub fn dataset() -> PassengerDataset {
    let records = AIR_PASSENGERS
        .iter()
        .enumerate()
        .flat_map(|(y, months)| {
            months.iter().enumerate().filter_map(move |(m, &p)| {
                NaiveDate::from_ymd_opt(FIRST_YEAR + y as i32, m as u32 + 1, 1)
                    .map(|d| PassengerRecord::new(d, p))
            })
        })
        .collect();
    PassengerDataset::from_records("built-in sample", records)
}
