//! Parameterized statements for restaurants and reviews.
//!
//! Aggregates: `review_count` is 0 for a restaurant without reviews, `average_rating`
//! is `TRUNC(AVG(rating), 1)` (truncated, not rounded) and NULL without reviews.

/// Idempotent DDL run by `Store::ensure_schema`. Reviews are deleted with their restaurant.
pub const CREATE_TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS restaurants (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        location VARCHAR(50) NOT NULL,
        price_range INT NOT NULL CHECK (price_range BETWEEN 1 AND 5)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id BIGSERIAL PRIMARY KEY,
        restaurant_id BIGINT NOT NULL REFERENCES restaurants (id) ON DELETE CASCADE,
        name VARCHAR(50) NOT NULL,
        review TEXT NOT NULL,
        rating INT NOT NULL CHECK (rating BETWEEN 1 AND 5)
    )
    "#,
    "CREATE INDEX IF NOT EXISTS reviews_restaurant_id_idx ON reviews (restaurant_id)",
];

/// Transaction-scoped advisory lock held while the DDL runs.
pub const SCHEMA_LOCK: &str = "SELECT pg_advisory_xact_lock(7428310)";

pub const LIST_RESTAURANTS: &str = r#"
    SELECT r.id, r.name, r.location, r.price_range,
           COALESCE(s.review_count, 0) AS review_count,
           s.average_rating
    FROM restaurants r
    LEFT JOIN (
        SELECT restaurant_id, COUNT(*) AS review_count, TRUNC(AVG(rating), 1)::float8 AS average_rating
        FROM reviews
        GROUP BY restaurant_id
    ) s ON s.restaurant_id = r.id
    ORDER BY r.id
"#;

/// One restaurant with its aggregate and its reviews (`json_agg`) read in a single statement.
/// $1 = restaurant id.
pub const GET_RESTAURANT_WITH_REVIEWS: &str = r#"
    SELECT r.id, r.name, r.location, r.price_range,
           COALESCE(s.review_count, 0) AS review_count,
           s.average_rating,
           COALESCE(
               (SELECT json_agg(v ORDER BY v.id)
                FROM (SELECT id, restaurant_id, name, review, rating
                      FROM reviews WHERE restaurant_id = r.id) v),
               '[]'::json
           ) AS reviews
    FROM restaurants r
    LEFT JOIN (
        SELECT restaurant_id, COUNT(*) AS review_count, TRUNC(AVG(rating), 1)::float8 AS average_rating
        FROM reviews
        WHERE restaurant_id = $1
        GROUP BY restaurant_id
    ) s ON s.restaurant_id = r.id
    WHERE r.id = $1
"#;

/// $1 name, $2 location, $3 price_range.
pub const INSERT_RESTAURANT: &str = r#"
    INSERT INTO restaurants (name, location, price_range)
    VALUES ($1, $2, $3)
    RETURNING id, name, location, price_range
"#;

/// $1 name, $2 location, $3 price_range, $4 id.
pub const UPDATE_RESTAURANT: &str = r#"
    UPDATE restaurants SET name = $1, location = $2, price_range = $3
    WHERE id = $4
    RETURNING id, name, location, price_range
"#;

/// $1 id. Returns no row when nothing was deleted.
pub const DELETE_RESTAURANT: &str = "DELETE FROM restaurants WHERE id = $1 RETURNING id";

/// $1 restaurant_id, $2 name, $3 review, $4 rating.
pub const INSERT_REVIEW: &str = r#"
    INSERT INTO reviews (restaurant_id, name, review, rating)
    VALUES ($1, $2, $3, $4)
    RETURNING id, restaurant_id, name, review, rating
"#;

pub const PING: &str = "SELECT 1";
