crate::resource! {
    /// Login identity of a customer profile.
    entity User;
    dto UserDto;
    mapper UserMapper;
    name "user";
    table "users";
    fields {
        role: String,
        profile_id: i64,
        /// Argon2 hash once stored; accepted as plaintext on input, never written out.
        #[serde(skip_serializing)]
        password: String,
    }
}
