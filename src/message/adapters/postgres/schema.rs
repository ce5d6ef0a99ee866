//! Diesel schema for message persistence.

diesel::table! {
    /// Chat messages with their tag sets and soft-delete flag.
    messages (id) {
        /// Message identifier.
        id -> Uuid,
        /// Owning conversation identifier.
        conversation_id -> Uuid,
        /// Authoring user identifier.
        sender_id -> Uuid,
        /// Message body.
        text -> Text,
        /// Tag set, stored sorted and deduplicated.
        tags -> Array<Text>,
        /// Users who liked the message.
        likes -> Array<Uuid>,
        /// Reaction records as a JSON array.
        reactions -> Jsonb,
        /// Resolution flag.
        resolved -> Bool,
        /// Soft-delete flag.
        deleted -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last mutation timestamp.
        updated_at -> Timestamptz,
    }
}
