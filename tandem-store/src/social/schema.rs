/// SQL schema for the social app database.
/// Creates all tables with proper constraints, foreign keys, and indexes.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT UNIQUE NOT NULL,
    email TEXT UNIQUE NOT NULL,
    password_hash TEXT NOT NULL,
    display_name TEXT,
    bio TEXT,
    avatar_url TEXT,
    created_at TEXT NOT NULL
);

-- Posts table
CREATE TABLE IF NOT EXISTS posts (
    id INTEGER PRIMARY KEY,
    user_id INTEGER NOT NULL,
    image_url TEXT,
    caption TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id);
CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at DESC);

-- Comments table
CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY,
    post_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_comments_post_id ON comments(post_id);
CREATE INDEX IF NOT EXISTS idx_comments_user_id ON comments(user_id);

-- Likes table (one row per (post, user) pair)
CREATE TABLE IF NOT EXISTS likes (
    id INTEGER PRIMARY KEY,
    post_id INTEGER NOT NULL,
    user_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (post_id, user_id),
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (user_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_likes_user_id ON likes(user_id);

-- Follow edges (follower -> followee)
CREATE TABLE IF NOT EXISTS follows (
    id INTEGER PRIMARY KEY,
    follower_id INTEGER NOT NULL,
    followee_id INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (follower_id) REFERENCES users(id) ON DELETE CASCADE,
    FOREIGN KEY (followee_id) REFERENCES users(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_follows_follower ON follows(follower_id);
CREATE INDEX IF NOT EXISTS idx_follows_followee ON follows(followee_id);
"#;

/// Seed data for development and testing: three users, a handful of posts,
/// comments, likes, and a small follow graph.
pub const SEED_DATA: &str = r#"
INSERT OR IGNORE INTO users (id, username, email, password_hash, display_name, bio, avatar_url, created_at) VALUES
    (1, 'alice', 'alice@example.com', '$2b$12$seedhashalice0000000000', 'Alice', 'Street photographer', 'https://img.example.com/u/alice.jpg', '2024-01-01T09:00:00Z'),
    (2, 'bob', 'bob@example.com', '$2b$12$seedhashbob00000000000', 'Bob', NULL, NULL, '2024-01-02T10:30:00Z'),
    (3, 'carla', 'carla@example.com', '$2b$12$seedhashcarla000000000', NULL, 'Plant person', NULL, '2024-01-03T18:15:00Z');

INSERT OR IGNORE INTO posts (id, user_id, image_url, caption, created_at) VALUES
    (1, 1, 'https://img.example.com/p/1.jpg', 'Golden hour downtown', '2024-01-10T17:45:00Z'),
    (2, 1, 'https://img.example.com/p/2.jpg', NULL, '2024-01-11T08:20:00Z'),
    (3, 2, NULL, 'No picture, just thoughts', '2024-01-11T12:00:00Z'),
    (4, 3, 'https://img.example.com/p/4.jpg', 'Monstera update', '2024-01-12T07:10:00Z');

INSERT OR IGNORE INTO comments (id, post_id, user_id, body, created_at) VALUES
    (1, 1, 2, 'Great light!', '2024-01-10T18:00:00Z'),
    (2, 1, 3, 'Which lens?', '2024-01-10T18:30:00Z'),
    (3, 4, 1, 'New leaf already?', '2024-01-12T09:00:00Z');

INSERT OR IGNORE INTO likes (id, post_id, user_id, created_at) VALUES
    (1, 1, 2, '2024-01-10T18:01:00Z'),
    (2, 1, 3, '2024-01-10T18:31:00Z'),
    (3, 3, 1, '2024-01-11T12:30:00Z'),
    (4, 4, 2, '2024-01-12T08:00:00Z');

INSERT OR IGNORE INTO follows (id, follower_id, followee_id, created_at) VALUES
    (1, 2, 1, '2024-01-05T11:00:00Z'),
    (2, 3, 1, '2024-01-06T12:00:00Z'),
    (3, 1, 3, '2024-01-07T13:00:00Z');
"#;
