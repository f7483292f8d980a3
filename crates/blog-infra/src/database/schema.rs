//! Schema bootstrap from the entity definitions.

use sea_orm::{ConnectionTrait, DbConn, DbErr, EntityTrait, Schema};

use super::entity::{comment, post, user};

/// Create any missing tables. Parents first so foreign keys resolve.
pub async fn ensure_schema(db: &DbConn) -> Result<(), DbErr> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, user::Entity).await?;
    create_table(db, &schema, post::Entity).await?;
    create_table(db, &schema, comment::Entity).await?;

    tracing::info!("Database schema ready");
    Ok(())
}

async fn create_table<E>(db: &DbConn, schema: &Schema, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let table = entity.table_name().to_owned();

    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    db.execute(db.get_database_backend().build(&stmt)).await?;

    tracing::debug!(table = %table, "Table ensured");
    Ok(())
}
