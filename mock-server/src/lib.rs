use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalCenter {
    pub id_center: i64,
    pub center_name: String,
    pub center_description: String,
    pub center_address: String,
    pub center_number: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Administrator {
    pub id: i64,
    pub full_name: String,
    pub email: String,
    pub center_name: String,
    pub password: String,
    pub address: String,
    pub med_center_id: i64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub center_name: String,
    pub password: Option<String>,
    pub address: String,
    pub med_center_id: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyclinic {
    pub id_center: i64,
    pub center_name: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub role: String,
    pub db_id: String,
    pub full_name: String,
    pub center_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserInfo {
    pub full_name: String,
    pub med_center_id: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MedCenterInfo {
    pub center_name: String,
}

/// Opaque body returned by mutation endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Status {
    pub status: String,
}

/// A login that is not backed by an administrator row.
#[derive(Clone, Debug)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub role: String,
    pub db_id: String,
    pub full_name: String,
    pub center_name: String,
}

/// Rows of one kind plus the next id to hand out. Ids start at 1; 0 is
/// never assigned.
#[derive(Debug)]
pub struct Table<R> {
    rows: Vec<R>,
    next_id: i64,
}

impl<R> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct Tables {
    pub centers: Table<MedicalCenter>,
    pub admins: Table<Administrator>,
    pub doctors: Table<Doctor>,
    pub accounts: Vec<Account>,
}

pub type Db = Arc<RwLock<Tables>>;

/// Record kinds served by the generic CRUD handlers.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: &'static str;
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn table(tables: &Tables) -> &Table<Self>;
    fn table_mut(tables: &mut Tables) -> &mut Table<Self>;
}

impl Record for MedicalCenter {
    const KIND: &'static str = "medical center";
    fn id(&self) -> i64 {
        self.id_center
    }
    fn set_id(&mut self, id: i64) {
        self.id_center = id;
    }
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.centers
    }
    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.centers
    }
}

impl Record for Administrator {
    const KIND: &'static str = "administrator";
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.admins
    }
    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.admins
    }
}

impl Record for Doctor {
    const KIND: &'static str = "doctor";
    fn id(&self) -> i64 {
        self.id
    }
    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
    fn table(tables: &Tables) -> &Table<Self> {
        &tables.doctors
    }
    fn table_mut(tables: &mut Tables) -> &mut Table<Self> {
        &mut tables.doctors
    }
}

/// Account seeded by `app()`: the platform super-admin.
pub fn default_accounts() -> Vec<Account> {
    vec![Account {
        email: "root@clinic.local".to_string(),
        password: "root".to_string(),
        role: "sudo-admin".to_string(),
        db_id: "0".to_string(),
        full_name: "Platform Administrator".to_string(),
        center_name: String::new(),
    }]
}

pub fn app() -> Router {
    app_with(default_accounts())
}

pub fn app_with(accounts: Vec<Account>) -> Router {
    let db: Db = Arc::new(RwLock::new(Tables {
        accounts,
        ..Tables::default()
    }));
    Router::new()
        .route("/login", post(login))
        .route("/user/{id}", get(user_info))
        .route("/med_center/{id}", get(med_center_info))
        .route("/polyclinics", get(polyclinics))
        .route("/med-centers", get(list::<MedicalCenter>))
        .route("/add-med-center", post(create::<MedicalCenter>))
        .route("/update-med-center/{id}", put(update::<MedicalCenter>))
        .route("/delete-med-center/{id}", delete(remove::<MedicalCenter>))
        .route("/admins", get(list::<Administrator>))
        .route("/add-admin", post(create::<Administrator>))
        .route("/update-admin/{id}", put(update::<Administrator>))
        .route("/delete-admin/{id}", delete(remove::<Administrator>))
        .route("/main-doctors", get(list::<Doctor>))
        .route("/add-doctor", post(create::<Doctor>))
        .route("/update-doctor/{id}", put(update::<Doctor>))
        .route("/delete-doctor/{id}", delete(remove::<Doctor>))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn status(text: &str) -> Json<Status> {
    Json(Status {
        status: text.to_string(),
    })
}

async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let tables = db.read().await;
    let account = tables
        .accounts
        .iter()
        .find(|a| a.email == input.email && a.password == input.password)
        .map(|a| LoginResponse {
            role: a.role.clone(),
            db_id: a.db_id.clone(),
            full_name: a.full_name.clone(),
            center_name: a.center_name.clone(),
        });
    let admin = || {
        tables
            .admins
            .rows
            .iter()
            .find(|a| a.email == input.email && a.password == input.password)
            .map(|a| LoginResponse {
                role: "admin".to_string(),
                db_id: a.id.to_string(),
                full_name: a.full_name.clone(),
                center_name: a.center_name.clone(),
            })
    };
    match account.or_else(admin) {
        Some(response) => {
            info!(email = %input.email, role = %response.role, "login accepted");
            Ok(Json(response))
        }
        None => {
            info!(email = %input.email, "login rejected");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

async fn user_info(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<UserInfo>, StatusCode> {
    let tables = db.read().await;
    tables
        .admins
        .rows
        .iter()
        .find(|a| a.id == id)
        .map(|a| {
            Json(UserInfo {
                full_name: a.full_name.clone(),
                med_center_id: a.med_center_id.to_string(),
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

async fn med_center_info(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<MedCenterInfo>, StatusCode> {
    let tables = db.read().await;
    tables
        .centers
        .rows
        .iter()
        .find(|c| c.id_center == id)
        .map(|c| {
            Json(MedCenterInfo {
                center_name: c.center_name.clone(),
            })
        })
        .ok_or(StatusCode::NOT_FOUND)
}

async fn polyclinics(State(db): State<Db>) -> Json<Vec<Polyclinic>> {
    let tables = db.read().await;
    Json(
        tables
            .centers
            .rows
            .iter()
            .map(|c| Polyclinic {
                id_center: c.id_center,
                center_name: c.center_name.clone(),
            })
            .collect(),
    )
}

async fn list<R: Record>(State(db): State<Db>) -> Json<Vec<R>> {
    let tables = db.read().await;
    Json(R::table(&tables).rows.clone())
}

async fn create<R: Record>(
    State(db): State<Db>,
    Json(mut input): Json<R>,
) -> (StatusCode, Json<Status>) {
    let mut tables = db.write().await;
    let table = R::table_mut(&mut tables);
    let id = table.next_id;
    table.next_id += 1;
    input.set_id(id);
    table.rows.push(input);
    info!(kind = R::KIND, id, "created");
    (StatusCode::CREATED, status("created"))
}

async fn update<R: Record>(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(mut input): Json<R>,
) -> Result<Json<Status>, StatusCode> {
    let mut tables = db.write().await;
    let row = R::table_mut(&mut tables)
        .rows
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    input.set_id(id);
    *row = input;
    info!(kind = R::KIND, id, "updated");
    Ok(status("updated"))
}

async fn remove<R: Record>(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Status>, StatusCode> {
    let mut tables = db.write().await;
    let rows = &mut R::table_mut(&mut tables).rows;
    let before = rows.len();
    rows.retain(|r| r.id() != id);
    if rows.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    info!(kind = R::KIND, id, "deleted");
    Ok(status("deleted"))
}
