use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use dotenvy::dotenv;
use entraide_primitives::models::entities::demande::{Demande, NewDemande};
use entraide_primitives::models::entities::enum_types::{DemandeStatus, OffreStatus, UserRole};
use entraide_primitives::models::entities::offre::NewOffre;
use entraide_primitives::models::entities::user::{NewUser, User};
use std::env;
use uuid::Uuid;

fn hash_password(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    argon2
        .hash_password(password.as_bytes(), &salt)
        .unwrap()
        .to_string()
}

fn establish_connection() -> PgConnection {
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgConnection::establish(&database_url)
        .unwrap_or_else(|_| panic!("Error connecting to {}", database_url))
}

fn main() {
    dotenv().ok();
    println!("🌱 Seeding database...");

    let mut conn = establish_connection();

    // 1. Clean DB
    clean_db(&mut conn);

    // 2. Seed Users
    let alice_id = seed_user(
        &mut conn,
        "alice@entraide.dev",
        "Alice Martin",
        "password123",
        UserRole::User,
    );
    let bruno_id = seed_user(
        &mut conn,
        "bruno@entraide.dev",
        "Bruno Keita",
        "password123",
        UserRole::User,
    );
    let chloe_id = seed_user(
        &mut conn,
        "chloe@entraide.dev",
        "Chloé Dubois",
        "password123",
        UserRole::User,
    );
    let _admin_id = seed_user(
        &mut conn,
        "admin@entraide.dev",
        "Admin",
        "admin123",
        UserRole::Admin,
    );

    // 3. Seed Demandes and Offres
    let nginx = seed_demande(
        &mut conn,
        alice_id,
        "Besoin d'aide pour configurer nginx",
        "Mon site renvoie des 502 depuis la derniere mise a jour, il me faut \
         quelqu'un qui connait bien les reverse proxies.",
        "informatique",
        12_000,
        60,
    );
    seed_demande(
        &mut conn,
        alice_id,
        "Relecture de CV en anglais",
        "Je postule a des postes a Londres et j'aimerais une relecture \
         complete avec retours detailles.",
        "langues",
        5_000,
        30,
    );
    seed_demande(
        &mut conn,
        bruno_id,
        "Cours de guitare debutant",
        "Premiere guitare recue a Noel, je cherche une heure de prise en \
         main par visio.",
        "musique",
        8_000,
        60,
    );

    seed_offre(
        &mut conn,
        nginx.id,
        bruno_id,
        11_000,
        "J'administre des serveurs nginx depuis cinq ans, je peux regarder ce soir.",
    );
    seed_offre(
        &mut conn,
        nginx.id,
        chloe_id,
        12_000,
        "Devops de metier, dispo demain matin pour une session d'une heure.",
    );

    // 4. Seed Wallets
    seed_wallet_balance(&mut conn, chloe_id, 45_000); // 450.00 EUR of past earnings

    println!("✅ Database seeded successfully!");
    println!("   alice@entraide.dev / password123  (2 demandes, 2 offres recues)");
    println!("   bruno@entraide.dev / password123");
    println!("   chloe@entraide.dev / password123");
    println!("   admin@entraide.dev / admin123");
}

fn clean_db(conn: &mut PgConnection) {
    use diesel::sql_query;
    println!("🧹 Cleaning database...");
    sql_query(
        "TRUNCATE users, demandes, offres, meet_sessions, transactions, payout_requests, \
         app_settings, refresh_tokens, blacklisted_tokens, audit_logs CASCADE",
    )
    .execute(conn)
    .expect("Error truncating tables");
}

fn seed_user(
    conn: &mut PgConnection,
    u_email: &str,
    name: &str,
    password: &str,
    user_role: UserRole,
) -> Uuid {
    use entraide_primitives::schema::users;
    use entraide_primitives::schema::users::dsl::*;

    // Check if user exists
    let existing = users
        .filter(email.eq(u_email))
        .first::<User>(conn)
        .optional()
        .unwrap();

    if let Some(user) = existing {
        println!("User {} already exists", u_email);
        return user.id;
    }

    let hashed = hash_password(password);

    let new_user = NewUser {
        email: u_email,
        password_hash: &hashed,
        display_name: name,
        role: user_role,
    };

    let inserted_user: User = diesel::insert_into(users::table)
        .values(&new_user)
        .get_result(conn)
        .expect("Error inserting new user");

    println!("Created user: {}", u_email);
    inserted_user.id
}

fn seed_demande(
    conn: &mut PgConnection,
    requester: Uuid,
    d_title: &str,
    d_description: &str,
    d_category: &str,
    price: i64,
    minutes: i32,
) -> Demande {
    use entraide_primitives::schema::demandes;

    let new_demande = NewDemande {
        requester_id: requester,
        title: d_title,
        description: d_description,
        category: d_category,
        price_cents: price,
        duration_minutes: minutes,
        attachments: serde_json::json!([]),
        status: DemandeStatus::Pending,
    };

    let demande: Demande = diesel::insert_into(demandes::table)
        .values(&new_demande)
        .get_result(conn)
        .expect("Error inserting demande");

    println!("Created demande: {}", d_title);
    demande
}

fn seed_wallet_balance(conn: &mut PgConnection, u_id: Uuid, amt: i64) {
    use entraide_primitives::schema::users::dsl::*;

    diesel::update(users.filter(id.eq(u_id)))
        .set(wallet_balance_cents.eq(amt))
        .execute(conn)
        .expect("Error updating wallet balance");

    println!("Credited wallet for user {}", u_id);
}

fn seed_offre(conn: &mut PgConnection, demande: Uuid, offreur: Uuid, price: i64, text: &str) {
    use entraide_primitives::schema::offres;

    let new_offre = NewOffre {
        demande_id: demande,
        offreur_id: offreur,
        price_cents: price,
        message: text,
        status: OffreStatus::Pending,
    };

    diesel::insert_into(offres::table)
        .values(&new_offre)
        .execute(conn)
        .expect("Error inserting offre");

    println!("Created offre ({} cents)", price);
}
