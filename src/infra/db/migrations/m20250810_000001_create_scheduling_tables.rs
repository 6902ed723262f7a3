//! Migration: Create businesses, service offerings, schedule exceptions
//! and appointments tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Businesses::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Businesses::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Businesses::Name).string().not_null())
                    .col(ColumnDef::new(Businesses::WeeklyHours).json_binary().not_null())
                    .col(
                        ColumnDef::new(Businesses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Businesses::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ServiceOfferings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceOfferings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceOfferings::BusinessId).uuid().not_null())
                    .col(ColumnDef::new(ServiceOfferings::Name).string().not_null())
                    .col(
                        ColumnDef::new(ServiceOfferings::PriceCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceOfferings::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ServiceOfferings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_offerings_business")
                            .from(ServiceOfferings::Table, ServiceOfferings::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScheduleExceptions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScheduleExceptions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScheduleExceptions::BusinessId).uuid().not_null())
                    .col(ColumnDef::new(ScheduleExceptions::Kind).string().not_null())
                    .col(ColumnDef::new(ScheduleExceptions::StartDate).date().not_null())
                    .col(ColumnDef::new(ScheduleExceptions::EndDate).date().not_null())
                    .col(ColumnDef::new(ScheduleExceptions::Reason).string().not_null())
                    .col(ColumnDef::new(ScheduleExceptions::CustomHours).json_binary().null())
                    .col(ColumnDef::new(ScheduleExceptions::Title).string().not_null())
                    .col(ColumnDef::new(ScheduleExceptions::Description).string().not_null())
                    .col(
                        ColumnDef::new(ScheduleExceptions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_schedule_exceptions_business")
                            .from(ScheduleExceptions::Table, ScheduleExceptions::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedule_exceptions_business_dates")
                    .table(ScheduleExceptions::Table)
                    .col(ScheduleExceptions::BusinessId)
                    .col(ScheduleExceptions::StartDate)
                    .col(ScheduleExceptions::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Appointments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Appointments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Appointments::BusinessId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::ServiceId).uuid().not_null())
                    .col(ColumnDef::new(Appointments::Date).date().not_null())
                    .col(ColumnDef::new(Appointments::StartTime).time().not_null())
                    .col(
                        ColumnDef::new(Appointments::DurationMinutes)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Appointments::Status).string().not_null())
                    .col(ColumnDef::new(Appointments::CustomerName).string().not_null())
                    .col(ColumnDef::new(Appointments::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Appointments::CustomerPhone).string().null())
                    .col(
                        ColumnDef::new(Appointments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Appointments::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_business")
                            .from(Appointments::Table, Appointments::BusinessId)
                            .to(Businesses::Table, Businesses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_appointments_service")
                            .from(Appointments::Table, Appointments::ServiceId)
                            .to(ServiceOfferings::Table, ServiceOfferings::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // The booking transaction filters by business and date; keep that
        // lookup indexed.
        manager
            .create_index(
                Index::create()
                    .name("idx_appointments_business_date")
                    .table(Appointments::Table)
                    .col(Appointments::BusinessId)
                    .col(Appointments::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Appointments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScheduleExceptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceOfferings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Businesses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Businesses {
    Table,
    Id,
    Name,
    WeeklyHours,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ServiceOfferings {
    Table,
    Id,
    BusinessId,
    Name,
    PriceCents,
    DurationMinutes,
    CreatedAt,
}

#[derive(Iden)]
enum ScheduleExceptions {
    Table,
    Id,
    BusinessId,
    Kind,
    StartDate,
    EndDate,
    Reason,
    CustomHours,
    Title,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Appointments {
    Table,
    Id,
    BusinessId,
    ServiceId,
    Date,
    StartTime,
    DurationMinutes,
    Status,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    CreatedAt,
    UpdatedAt,
}
