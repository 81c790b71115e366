use chrono::{DateTime, Duration, Utc};

use super::FeedEntry;

/// Posts shown when the CMS can't be reached.
pub fn sample_entries(now: DateTime<Utc>) -> Vec<FeedEntry> {
    vec![
        FeedEntry {
            id: 1,
            title: "The Future of AI in Software Development".to_string(),
            description: "Exploring how artificial intelligence is revolutionizing the way we write, test, and deploy code in modern software development.".to_string(),
            author: "John Doe".to_string(),
            published_at: Some(now),
            slug: "future-of-ai-software-development".to_string(),
            thumbnail_url: "https://images.unsplash.com/photo-1677442136019-21780ecad995?w=800&auto=format&fit=crop".to_string(),
            category: None,
            tags: Vec::new(),
        },
        FeedEntry {
            id: 2,
            title: "Building Scalable Cloud Infrastructure".to_string(),
            description: "Best practices and strategies for designing cloud-native applications that can scale to millions of users.".to_string(),
            author: "Jane Smith".to_string(),
            published_at: Some(now - Duration::days(1)),
            slug: "scalable-cloud-infrastructure".to_string(),
            thumbnail_url: "https://images.unsplash.com/photo-1451187580459-43490279c0fa?w=800&auto=format&fit=crop".to_string(),
            category: None,
            tags: Vec::new(),
        },
        FeedEntry {
            id: 3,
            title: "Modern Web Development Trends 2024".to_string(),
            description: "A comprehensive look at the latest frameworks, tools, and methodologies shaping web development this year.".to_string(),
            author: "Mike Johnson".to_string(),
            published_at: Some(now - Duration::days(2)),
            slug: "modern-web-development-trends-2024".to_string(),
            thumbnail_url: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=800&auto=format&fit=crop".to_string(),
            category: None,
            tags: Vec::new(),
        },
    ]
}
